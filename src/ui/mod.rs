pub mod puzzle_grid_ui;
pub mod window;

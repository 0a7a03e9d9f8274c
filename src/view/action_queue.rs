use log::{debug, error, trace};
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::events::{EventObserver, Unsubscriber};
use crate::model::BoardEvent;

use super::{GridView, Task, TaskContext, TaskError};

const WORKER_NAME: &str = "action-queue";

/// Single-worker FIFO executor for view tasks.
///
/// Tasks run one at a time, in submission order, on a dedicated thread that
/// owns the [`GridView`]. Submitting never blocks the caller. A failing task
/// is logged and skipped; the queue itself keeps going.
pub struct ActionQueue {
    sender: Sender<Task>,
    worker: JoinHandle<GridView>,
}

impl ActionQueue {
    pub fn start(view: GridView, context: TaskContext) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<Task>();
        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || run_worker(receiver, view, context))?;
        Ok(Self { sender, worker })
    }

    pub fn submit(&self, task: Task) {
        send_task(&self.sender, task);
    }

    /// Turns every event on `observer` into one task.
    pub fn observe(&self, observer: &EventObserver<BoardEvent>) -> Unsubscriber<BoardEvent> {
        let sender = self.sender.clone();
        observer.subscribe(move |event: &BoardEvent| send_task(&sender, Task::from(event.clone())))
    }

    /// Closes the queue, waits for the pending tasks and returns the view.
    /// Subscriptions made with [`ActionQueue::observe`] keep the queue open,
    /// so remove them first.
    pub fn finish(self) -> thread::Result<GridView> {
        let ActionQueue { sender, worker } = self;
        drop(sender);
        worker.join()
    }
}

fn send_task(sender: &Sender<Task>, task: Task) {
    trace!(target: "action_queue", "Submitting {} task", task.kind());
    if let Err(err) = sender.send(task) {
        error!(target: "action_queue", "Worker is gone, dropping {} task", err.0.kind());
    }
}

fn run_worker(receiver: Receiver<Task>, mut view: GridView, context: TaskContext) -> GridView {
    debug!(target: "action_queue", "Worker started");
    let mut executed: u64 = 0;
    for task in receiver.iter() {
        let kind = task.kind();
        trace!(target: "action_queue", "Running task #{}: {:?}", executed, task);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| task.run(&mut view, &context)))
            .unwrap_or_else(|payload| Err(TaskError::Panicked(panic_message(payload.as_ref()))));
        if let Err(err) = outcome {
            error!(
                target: "action_queue",
                "Skipped the rest of {} task #{}, view may lag the board: {}",
                kind,
                executed,
                err
            );
        }
        executed += 1;
        if !context.step_delay.is_zero() {
            thread::sleep(context.step_delay);
        }
    }
    debug!(target: "action_queue", "Queue closed after {} tasks", executed);
    view
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCache, ImageHandle};
    use crate::events::Channel;
    use crate::model::{BoardObserver, BoardTiles, Category, Colour, Coordinate};
    use crate::tests::{test_assets, UsingLogger};
    use crate::view::{CellPainter, MutedPlayer};
    use rand::Rng;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use test_context::test_context;

    fn context(assets: &Arc<AssetCache>, step_delay: Duration) -> TaskContext {
        TaskContext {
            assets: assets.clone(),
            player: Box::new(MutedPlayer),
            step_delay,
        }
    }

    fn start(assets: &Arc<AssetCache>, painter: Box<dyn CellPainter>) -> ActionQueue {
        let view = GridView::new(assets.clone(), painter);
        ActionQueue::start(view, context(assets, Duration::ZERO)).unwrap()
    }

    /// Flags any paint that starts while another is still in progress, or
    /// that runs off the worker thread.
    struct ExclusivePainter {
        active: Arc<AtomicUsize>,
        violated: Arc<AtomicBool>,
        paints: Arc<AtomicUsize>,
    }

    impl CellPainter for ExclusivePainter {
        fn paint(&self, _coord: Coordinate, _image: &ImageHandle) {
            if self.active.fetch_add(1, Ordering::SeqCst) != 0
                || thread::current().name() != Some(WORKER_NAME)
            {
                self.violated.store(true, Ordering::SeqCst);
            }
            let jitter = rand::rng().random_range(0..50);
            thread::sleep(Duration::from_micros(jitter));
            self.paints.fetch_add(1, Ordering::SeqCst);
            self.active.fetch_sub(1, Ordering::SeqCst);
        }
    }

    struct PanickingPainter(Coordinate);

    impl CellPainter for PanickingPainter {
        fn paint(&self, coord: Coordinate, _image: &ImageHandle) {
            if coord == self.0 {
                panic!("paint failed at {}", coord);
            }
        }
    }

    fn random_coord<R: Rng>(rng: &mut R) -> Coordinate {
        Coordinate::new(rng.random_range(0..8), rng.random_range(0..8))
    }

    fn random_task<R: Rng>(rng: &mut R) -> Task {
        let colour = Colour::ALL[rng.random_range(0..Colour::ALL.len())];
        match rng.random_range(0..5) {
            0 => Task::Selection {
                selected: random_coord(rng),
                previous: rng.random_bool(0.5).then(|| random_coord(rng)),
            },
            1 => Task::Swap {
                a: random_coord(rng),
                b: random_coord(rng),
            },
            2 => Task::Clear((0..rng.random_range(0..4)).map(|_| random_coord(rng)).collect()),
            3 => Task::Drop {
                from: random_coord(rng),
                to: random_coord(rng),
            },
            _ => Task::Fill {
                coord: random_coord(rng),
                tile: colour,
            },
        }
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_cleared_then_filled(_: &mut UsingLogger) {
        let (_dir, assets) = test_assets();
        let queue = start(&assets, Box::new(crate::view::NullPainter));
        let top = Coordinate::new(2, 3);
        let bottom = Coordinate::new(2, 4);
        queue.submit(Task::Fill { coord: top, tile: Colour::Red });
        queue.submit(Task::Fill { coord: bottom, tile: Colour::Red });

        queue.submit(Task::Clear(vec![top, bottom]));
        queue.submit(Task::Fill { coord: top, tile: Colour::Green });

        let view = queue.finish().unwrap();
        assert_eq!(view.current_category(top), Category::Jewel(Colour::Green));
        assert_eq!(view.current_category(bottom), Category::Empty);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_swap_exchanges_only_two_cells(_: &mut UsingLogger) {
        let (_dir, assets) = test_assets();
        let queue = start(&assets, Box::new(crate::view::NullPainter));
        let board = BoardTiles::random(&mut rand::rng());
        let a = Coordinate::new(1, 1);
        let b = Coordinate::new(1, 2);

        queue.submit(Task::Redraw(board));
        queue.submit(Task::Swap { a, b });

        let view = queue.finish().unwrap();
        let mut expected = board;
        expected.swap(a, b);
        assert_eq!(view.tiles(), expected);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_selection_moves_highlight(_: &mut UsingLogger) {
        let (_dir, assets) = test_assets();
        let queue = start(&assets, Box::new(crate::view::NullPainter));
        let first = Coordinate::new(0, 0);
        let second = Coordinate::new(0, 1);
        queue.submit(Task::Fill { coord: first, tile: Colour::Blue });
        queue.submit(Task::Fill { coord: second, tile: Colour::Yellow });

        queue.submit(Task::Selection { selected: first, previous: None });
        queue.submit(Task::Selection { selected: second, previous: Some(first) });

        let view = queue.finish().unwrap();
        assert_eq!(view.current_category(first), Category::Jewel(Colour::Blue));
        assert_eq!(view.current_category(second), Category::Highlighted(Colour::Yellow));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_final_view_matches_in_order_replay(_: &mut UsingLogger) {
        let (_dir, assets) = test_assets();
        let active = Arc::new(AtomicUsize::new(0));
        let violated = Arc::new(AtomicBool::new(false));
        let paints = Arc::new(AtomicUsize::new(0));
        let queue = start(
            &assets,
            Box::new(ExclusivePainter {
                active: active.clone(),
                violated: violated.clone(),
                paints: paints.clone(),
            }),
        );

        let mut rng = rand::rng();
        let mut tasks = vec![Task::Redraw(BoardTiles::random(&mut rng))];
        tasks.extend((0..300).map(|_| random_task(&mut rng)));

        let mut expected = GridView::headless(assets.clone());
        let replay_context = context(&assets, Duration::ZERO);
        for task in &tasks {
            let _ = task.clone().run(&mut expected, &replay_context);
            queue.submit(task.clone());
        }

        let view = queue.finish().unwrap();
        for coord in Coordinate::all() {
            assert_eq!(
                view.current_category(coord),
                expected.current_category(coord),
                "at {}",
                coord
            );
        }
        assert!(!violated.load(Ordering::SeqCst), "two tasks painted at once");
        assert!(paints.load(Ordering::SeqCst) >= 64);
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_failed_tasks_do_not_stop_the_queue(_: &mut UsingLogger) {
        let (_dir, assets) = test_assets();
        let poisoned = Coordinate::new(7, 7);
        let queue = start(&assets, Box::new(PanickingPainter(poisoned)));
        let target = Coordinate::new(3, 3);

        // highlight on an empty cell fails
        queue.submit(Task::Selection { selected: target, previous: None });
        queue.submit(Task::Fill { coord: poisoned, tile: Colour::Red });
        queue.submit(Task::Fill { coord: target, tile: Colour::White });

        let view = queue.finish().unwrap();
        assert_eq!(view.current_category(target), Category::Jewel(Colour::White));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_submit_does_not_wait_for_tasks(_: &mut UsingLogger) {
        let (_dir, assets) = test_assets();
        let view = GridView::headless(assets.clone());
        let queue = ActionQueue::start(view, context(&assets, Duration::from_millis(200))).unwrap();

        let started = Instant::now();
        for x in 0..3 {
            queue.submit(Task::Fill {
                coord: Coordinate::new(x, 0),
                tile: Colour::Orange,
            });
        }
        assert!(started.elapsed() < Duration::from_millis(100));

        let view = queue.finish().unwrap();
        assert!(started.elapsed() >= Duration::from_millis(400));
        assert_eq!(
            view.current_category(Coordinate::new(2, 0)),
            Category::Jewel(Colour::Orange)
        );
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_observed_events_become_tasks(_: &mut UsingLogger) {
        let (_dir, assets) = test_assets();
        let queue = start(&assets, Box::new(crate::view::NullPainter));
        let (emitter, observer) = Channel::<BoardEvent>::new();
        let subscription = queue.observe(&observer);
        let from = Coordinate::new(4, 0);
        let to = Coordinate::new(4, 1);

        emitter.filled(from, Colour::Purple);
        emitter.dropped(from, to);
        emitter.filled(from, Colour::Blue);

        assert!(subscription.unsubscribe());
        let view = queue.finish().unwrap();
        assert_eq!(view.current_category(to), Category::Jewel(Colour::Purple));
        assert_eq!(view.current_category(from), Category::Jewel(Colour::Blue));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_submitted_and_observed_tasks_share_one_order(_: &mut UsingLogger) {
        let (_dir, assets) = test_assets();
        let queue = start(&assets, Box::new(crate::view::NullPainter));
        let (emitter, observer) = Channel::<BoardEvent>::new();
        let subscription = queue.observe(&observer);
        let coord = Coordinate::new(6, 2);

        queue.submit(Task::Fill { coord, tile: Colour::Red });
        emitter.cleared(vec![coord]);
        queue.submit(Task::Fill { coord, tile: Colour::Green });
        emitter.selection_changed(coord, None);

        assert!(subscription.unsubscribe());
        let view = queue.finish().unwrap();
        assert_eq!(view.current_category(coord), Category::Highlighted(Colour::Green));
    }
}

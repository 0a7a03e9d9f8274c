/// Explicit teardown for components that hold subscriptions or widgets which
/// would otherwise keep each other alive.
pub trait Destroyable {
    fn destroy(&mut self);
}

use super::context::TickContext;

/// A rule that runs once per year end, after every player has taken a turn.
///
/// Object-safe so systems can be stored as `Box<dyn SimSystem>` and run in
/// registration order.
pub trait SimSystem {
    fn name(&self) -> &str;
    fn tick(&mut self, ctx: &mut TickContext);
}

use crate::Screen;

/// Screen implementation that discards every frame
pub struct NoScreen;

impl Screen for NoScreen {
    fn draw(&mut self, _frame: &[u32]) {}
}

use arena_core::{Color, PeerId, Position};

/// Renderer seam. The reconciler mirrors every peer lifecycle change into it.
pub trait Scene {
    fn spawn(&mut self, id: &PeerId, position: Position, color: Color);

    fn place(&mut self, id: &PeerId, position: Position);

    fn despawn(&mut self, id: &PeerId);
}

/// Scene that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScene;

impl Scene for NullScene {
    fn spawn(&mut self, _id: &PeerId, _position: Position, _color: Color) {}

    fn place(&mut self, _id: &PeerId, _position: Position) {}

    fn despawn(&mut self, _id: &PeerId) {}
}

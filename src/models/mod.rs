pub mod contour;
pub mod mask;
pub mod point;
pub mod rect;
pub mod region;

pub use contour::{BorderKind, Contour};
pub use mask::Mask;
pub use point::PointI;
pub use rect::Rect;
pub use region::{Candidate, InscribedSquare};

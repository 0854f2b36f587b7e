mod point;
mod poly_line;
mod round;
mod side;

pub use point::{Point, PointError};
pub use poly_line::{Crossing, PolyLine};
pub use round::{RoundEvent, RoundState, TransitionError};
pub use side::{Side, SideError};

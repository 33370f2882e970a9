//! Widget system: the control capability trait consumed by the solver.

pub mod traits;

pub use traits::Control;

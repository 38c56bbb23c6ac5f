mod addr;
mod err;
mod reading;
mod sense;
mod ultrasonic;

pub use addr::Address;
pub use err::Error;
pub use reading::{Reading, Unit};
pub use sense::Sense;
pub use ultrasonic::Ultrasonic;

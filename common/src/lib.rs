pub mod constants;
pub mod pixel;
pub mod record;
pub mod window;

pub use pixel::{PixelDecodeError, PixelPoint};
pub use record::PlacementRecord;
pub use window::{MalformedTimestamp, TimeWindow, WindowError, hour_floor};

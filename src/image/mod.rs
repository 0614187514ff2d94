pub mod accessor;
pub mod buffer;
pub mod io;
pub mod traits;

pub use self::accessor::{PixelAccessor, PixelView};
pub use self::buffer::PixelBuffer;
pub use self::traits::{ImageView, ImageViewMut};

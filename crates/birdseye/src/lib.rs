#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use birdseye_image as image;

#[doc(inline)]
pub use birdseye_imgproc as imgproc;

#[doc(inline)]
pub use birdseye_io as io;

#[doc(inline)]
pub use birdseye_bev as bev;

#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use lensmtf_image as image;

#[doc(inline)]
pub use lensmtf_imgproc as imgproc;

#[doc(inline)]
pub use lensmtf_sfr as sfr;

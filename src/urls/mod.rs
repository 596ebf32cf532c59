//! # ماژول آدرس‌ها (URL Resolvers)
//!
//! دو تابع pure که موقع render صدا زده میشن:
//!
//! - [`resolve_asset_url`]: مسیر فایل بک‌اند (آواتار، thumbnail، سند) → آدرس کامل
//! - [`resolve_embed_url`]: لینک YouTube/Vimeo → آدرس قابل embed در iframe
//!
//! هیچ‌کدوم I/O یا cache ندارن و هیچ‌وقت خطا برنمیگردونن؛ ورودی ناشناخته
//! یا به قاعده پیش‌فرض میرسه یا دست‌نخورده برمیگرده.

mod asset;
mod embed;

pub use asset::*;
pub use embed::*;

//! Loader combinators.
//!
//! Both composites are themselves loaders, so they nest: the usual wiring is
//! a fallback whose primary is a cache decorator around the remote loader.

mod decorator;
mod fallback;

pub use decorator::CacheDecorator;
pub use fallback::FallbackComposite;

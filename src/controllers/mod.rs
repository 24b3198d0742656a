//! Page Controllers
//!
//! One controller per interactive feature. Each resolves the elements it
//! owns once, keeps its listeners and timers, and releases them on teardown.

pub mod booking;
pub mod carousel;
pub mod contact;
pub mod field_errors;
pub mod gallery;
pub mod map;
pub mod mobile_menu;
pub mod modal;
pub mod page;
pub mod quick_booking;
pub mod room_booking;
pub mod scroll_effects;
pub mod stats;

pub use carousel::CarouselRegistry;
pub use contact::{ContactPage, PropertyPins};
pub use gallery::Gallery;
pub use map::PropertyMap;
pub use mobile_menu::MobileMenu;
pub use page::PageChrome;
pub use quick_booking::QuickBooking;
pub use room_booking::RoomBooking;
pub use scroll_effects::ScrollEffects;
pub use stats::StatsCounters;

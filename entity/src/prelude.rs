pub use super::checkin::Entity as Checkin;
pub use super::geocache::Entity as Geocache;
pub use super::image::Entity as Image;
pub use super::user::Entity as User;

mod audio;
mod book;
mod category;
mod chapter;
mod history;
mod page;
mod review;
mod user;
mod voice;

pub use audio::{Audio, AudioUpdate, NewAudio};
pub use book::{Book, BookDetail, BookUpdate, FeaturedBook, NewBook};
pub use category::Category;
pub use chapter::{Chapter, ChapterUpdate, NewChapter};
pub use history::ListenHistoryEntry;
pub use page::{Page, PageResponse};
pub use review::{NewReview, Rating, Review, ReviewAuthor};
pub use user::{PasswordChange, ProfileUpdate, Registration, Role, User, UserUpdate};
pub use voice::{NewVoiceSample, VoiceSample, VoiceSampleUpdate};

use serde::{Deserialize, Deserializer};

/// The backend sends `null` for empty text columns; treat it as the default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

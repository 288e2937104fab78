mod bottom;
mod card;
mod cards;
mod config;
mod declaration;
mod error;
mod event;
mod follow;
mod pattern;
mod rank;
mod round;
mod seat;
mod seed;
mod suit;
mod trick;
mod trump;
mod types;

pub use bottom::*;
pub use card::*;
pub use cards::*;
pub use config::*;
pub use declaration::*;
pub use error::*;
pub use event::*;
pub use follow::*;
pub use pattern::*;
pub use rank::*;
pub use round::*;
pub use seat::*;
pub use seed::*;
pub use suit::*;
pub use trick::*;
pub use trump::*;
pub use types::*;

pub mod episode;
pub mod ids;
pub mod stats;
pub mod watch;
pub mod work;

pub use episode::Episode;
pub use ids::{EpisodeId, WorkId};
pub use stats::QuarterStats;
pub use watch::{Watch, RATING_RANGE};
pub use work::Work;

pub mod classifier;
pub mod grade;
pub mod initial;
pub mod learned_item;
pub mod review_session;
pub mod review_state;
pub mod sm2;

pub use classifier::{Classification, Scheduled, classify, classify_with, due_cutoff};
pub use grade::Grade;
pub use initial::schedule;
pub use learned_item::{Difficulty, LearnedItem, NewItem, infer_title, parse_solved_date};
pub use review_session::ReviewSession;
pub use review_state::{DAY_MS, RawReviewState, ReviewPatch, ReviewState, now_millis};
pub use sm2::{Sm2Scheduler, grade};

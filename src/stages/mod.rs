pub mod stage0_detect;
pub mod stage1_resolve;
pub mod stage2_trim;
pub mod stage3_order;
pub mod stage4_round;

pub use stage0_detect::*;
pub use stage1_resolve::*;
pub use stage2_trim::*;
pub use stage3_order::*;
pub use stage4_round::*;

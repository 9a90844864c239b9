pub mod marquee_label;

pub use marquee_label::MarqueeLabel;

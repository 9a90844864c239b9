pub mod marquee_view;

pub mod fade;
pub mod fitter;

pub mod util {
    use std::fmt::Display;

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Point {
        pub x: f64,
        pub y: f64,
    }

    impl Point {
        pub const fn new(x: f64, y: f64) -> Self {
            Self { x, y }
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Size {
        pub width: f64,
        pub height: f64,
    }

    impl Size {
        pub const fn new(width: f64, height: f64) -> Self {
            Self { width, height }
        }
    }

    impl Display for Size {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}x{}", self.width, self.height)
        }
    }

    /// Axis aligned rectangle, origin at the top left corner
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Rect {
        pub x: f64,
        pub y: f64,
        pub width: f64,
        pub height: f64,
    }

    impl Rect {
        pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
            Self {
                x,
                y,
                width,
                height,
            }
        }

        pub const fn from_size(size: Size) -> Self {
            Self::new(0.0, 0.0, size.width, size.height)
        }

        pub fn max_x(&self) -> f64 {
            self.x + self.width
        }

        pub fn mid_y(&self) -> f64 {
            self.y + self.height / 2.0
        }

        pub fn translated(&self, dx: f64, dy: f64) -> Self {
            Self::new(self.x + dx, self.y + dy, self.width, self.height)
        }
    }

    impl Display for Rect {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "({}, {}, {}, {})",
                self.x, self.y, self.width, self.height
            )
        }
    }
}

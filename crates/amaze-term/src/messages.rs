//! Input events: [`Msg`] and [`Key`].

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// A printable character other than space.
    Char(char),
}

/// A message delivered to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    KeyDown(Key),
    /// The terminal was resized.
    Screen { width: i32, height: i32 },
    /// A delay scheduled with [`Effect::Tick`](crate::app::Effect::Tick)
    /// elapsed.
    Tick,
    /// Sent once when the application starts.
    Init,
}

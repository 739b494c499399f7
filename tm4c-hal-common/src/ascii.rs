//! ASCII control characters understood by the serial text protocols.
//!
//! Only [`CR`] and [`BS`] are interpreted by the decoders and the line
//! editor. The others are here for callers that drive a terminal.

/// Carriage return. Terminates numeric input and lines.
pub const CR: u8 = 0x0D;

/// Line feed. Never consumed, only emitted by callers to move the cursor down.
pub const LF: u8 = 0x0A;

/// Backspace. Erases the most recently accepted digit or character.
pub const BS: u8 = 0x08;

/// Escape
pub const ESC: u8 = 0x1B;

/// Space
pub const SP: u8 = 0x20;

/// Delete
pub const DEL: u8 = 0x7F;

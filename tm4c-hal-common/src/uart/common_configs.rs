use super::{DataBits, StopBits, UartConfig};
use fugit::HertzU32;

const fn eight_n_one(baudrate: u32) -> UartConfig {
    UartConfig::new(
        HertzU32::from_raw(baudrate),
        DataBits::Eight,
        None,
        StopBits::One,
    )
}

/// 9600 baud, 8 data bits, no parity, 1 stop bit
pub const _9600_8_N_1: UartConfig = eight_n_one(9600);

/// 19200 baud, 8 data bits, no parity, 1 stop bit
pub const _19200_8_N_1: UartConfig = eight_n_one(19_200);

/// 38400 baud, 8 data bits, no parity, 1 stop bit
pub const _38400_8_N_1: UartConfig = eight_n_one(38_400);

/// 57600 baud, 8 data bits, no parity, 1 stop bit
pub const _57600_8_N_1: UartConfig = eight_n_one(57_600);

/// 115200 baud, 8 data bits, no parity, 1 stop bit
pub const _115200_8_N_1: UartConfig = eight_n_one(115_200);

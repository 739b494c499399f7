//! Useful UART types

use fugit::HertzU32;

/// Bus clock the fixed configuration is derived from (PLL set up for 50 MHz).
pub const BUS_CLOCK: HertzU32 = HertzU32::from_raw(50_000_000);

/// Error type for UART operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bad argument : when things overflow, ...
    BadArgument,
}

/// Data bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    /// 5 bits
    Five,
    /// 6 bits
    Six,
    /// 7 bits
    Seven,
    /// 8 bits
    Eight,
}

/// Stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    /// 1 bit
    One,
    /// 2 bits
    Two,
}

/// Parity
///
/// The "none" state of parity is represented with the Option type (None).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    /// Odd parity
    Odd,
    /// Even parity
    Even,
}

/// A struct holding the requested configuration for an UART device.
///
/// The `Default` implementation implements the following values:
/// ```ignore
/// # // can't actually create this with the non_exhaustive attribute
/// UartConfig {
///    baudrate: HertzU32::from_raw(115_200),
///    data_bits: DataBits::Eight,
///    stop_bits: StopBits::One,
///    parity: None,
///}
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// The baudrate the uart will run at.
    pub baudrate: HertzU32,

    /// The amount of data bits the uart should be configured to.
    pub data_bits: DataBits,

    /// The amount of stop bits the uart should be configured to.
    pub stop_bits: StopBits,

    /// The parity that this uart should have
    pub parity: Option<Parity>,
}

impl UartConfig {
    /// Create a new instance of UartConfig
    pub const fn new(
        baudrate: HertzU32,
        data_bits: DataBits,
        parity: Option<Parity>,
        stop_bits: StopBits,
    ) -> UartConfig {
        UartConfig {
            baudrate,
            data_bits,
            stop_bits,
            parity,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        super::common_configs::_115200_8_N_1
    }
}

/// Integer and fractional baud rate divisors.
///
/// The divider is `bus_clock / (16 * baudrate)`. `integer` is its whole part
/// and `fractional` the remainder in 64ths, rounded to nearest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudDivisors {
    /// Value for the integer baud rate divisor register.
    pub integer: u16,
    /// Value for the 6-bit fractional baud rate divisor register.
    pub fractional: u8,
}

impl BaudDivisors {
    /// Largest value the fractional divisor register holds.
    pub const FRACTIONAL_MAX: u8 = 0x3F;

    /// From the wanted baudrate, calculate the divider's integer and fractional parts.
    ///
    /// Out of range dividers are clamped to what the hardware can represent.
    pub const fn new(baudrate: HertzU32, frequency: HertzU32) -> Result<Self, Error> {
        // Divider scaled by 128: the low 7 bits hold twice the 64ths, so
        // halving them with rounding up gives the nearest 6-bit fraction.
        let baudrate_div = match frequency.raw().checked_mul(8) {
            Some(scaled) => match scaled.checked_div(baudrate.raw()) {
                Some(div) => div,
                None => return Err(Error::BadArgument),
            },
            None => return Err(Error::BadArgument),
        };

        Ok(
            match (baudrate_div >> 7, (baudrate_div & 0x7F).div_ceil(2)) {
                (0, _) => Self::from_parts(1, 0),

                (int_part, _) if int_part >= 65535 => Self::from_parts(65535, 0),

                // Rounding carried into the next whole step.
                (int_part, 64) => Self::from_parts(int_part + 1, 0),

                (int_part, frac_part) => Self::from_parts(int_part, frac_part),
            },
        )
    }

    const fn from_parts(integer: u32, fractional: u32) -> Self {
        Self {
            integer: integer as u16,
            fractional: fractional as u8,
        }
    }

    /// The baudrate these divisors really produce from `frequency`.
    pub const fn actual_baudrate(&self, frequency: HertzU32) -> HertzU32 {
        let divisor = 64 * self.integer as u64 + self.fractional as u64;
        HertzU32::from_raw((4 * frequency.raw() as u64 / divisor) as u32)
    }
}

/// Everything the peripheral is programmed with, derived once from an
/// [`UartConfig`] and the bus clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfiguration {
    /// Baud rate divisors.
    pub divisors: BaudDivisors,
    /// Word length.
    pub data_bits: DataBits,
    /// Stop bits.
    pub stop_bits: StopBits,
    /// Parity, `None` when disabled.
    pub parity: Option<Parity>,
    /// Whether the transmit and receive FIFOs are enabled.
    pub fifos: bool,
}

impl UartConfiguration {
    /// 115 200 baud, 8 data bits, no parity, 1 stop bit, FIFOs enabled, from
    /// a 50 MHz bus clock.
    pub const DEFAULT: UartConfiguration =
        match UartConfiguration::new(super::common_configs::_115200_8_N_1, BUS_CLOCK) {
            Ok(configuration) => configuration,
            Err(_) => panic!("default UART configuration out of range"),
        };

    /// Derive the register-level configuration. FIFOs are always enabled.
    pub const fn new(config: UartConfig, bus_clock: HertzU32) -> Result<Self, Error> {
        let divisors = match BaudDivisors::new(config.baudrate, bus_clock) {
            Ok(divisors) => divisors,
            Err(e) => return Err(e),
        };

        Ok(Self {
            divisors,
            data_bits: config.data_bits,
            stop_bits: config.stop_bits,
            parity: config.parity,
            fifos: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fugit::RateExtU32;

    #[test]
    fn datasheet_example() {
        // 50 MHz / (16 * 115200) = 27.1267, 0.1267 * 64 + 0.5 = 8.6
        assert_eq!(
            BaudDivisors::new(115_200.Hz(), 50_000_000.Hz()),
            Ok(BaudDivisors {
                integer: 27,
                fractional: 8
            })
        );
    }

    #[test]
    fn fraction_is_rounded_to_nearest() {
        // 16 MHz / (16 * 9600) = 104.1666, 0.1666 * 64 = 10.67
        assert_eq!(
            BaudDivisors::new(9600.Hz(), 16_000_000.Hz()),
            Ok(BaudDivisors {
                integer: 104,
                fractional: 11
            })
        );
    }

    #[test]
    fn exact_divider_has_no_fraction() {
        // 16 MHz / (16 * 62500) = 16
        assert_eq!(
            BaudDivisors::new(62_500.Hz(), 16_000_000.Hz()),
            Ok(BaudDivisors {
                integer: 16,
                fractional: 0
            })
        );
    }

    #[test]
    fn fraction_never_exceeds_six_bits() {
        for baud in [300u32, 1200, 2400, 4800, 9600, 14_400, 19_200, 38_400, 57_600, 115_200] {
            let divisors = BaudDivisors::new(baud.Hz(), 50_000_000.Hz()).unwrap();
            assert!(divisors.fractional <= BaudDivisors::FRACTIONAL_MAX);
        }
    }

    #[test]
    fn rounding_carries_into_integer() {
        // 8 * 511 / 8 = 511 = 3 * 128 + 127, and 127 rounds up to 64/64
        let divisors = BaudDivisors::new(8.Hz(), 511.Hz()).unwrap();
        assert_eq!(
            divisors,
            BaudDivisors {
                integer: 4,
                fractional: 0
            }
        );
    }

    #[test]
    fn out_of_range_dividers_are_clamped() {
        assert_eq!(
            BaudDivisors::new(50_000_000.Hz(), 1_000_000.Hz()),
            Ok(BaudDivisors {
                integer: 1,
                fractional: 0
            })
        );
        assert_eq!(
            BaudDivisors::new(1.Hz(), 50_000_000.Hz()),
            Ok(BaudDivisors {
                integer: 65535,
                fractional: 0
            })
        );
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(
            BaudDivisors::new(0.Hz(), 50_000_000.Hz()),
            Err(Error::BadArgument)
        );
        assert_eq!(
            BaudDivisors::new(115_200.Hz(), u32::MAX.Hz()),
            Err(Error::BadArgument)
        );
    }

    #[test]
    fn actual_baudrate_is_close() {
        let divisors = BaudDivisors::new(115_200.Hz(), 50_000_000.Hz()).unwrap();
        assert_eq!(
            divisors.actual_baudrate(50_000_000.Hz()),
            HertzU32::from_raw(115_207)
        );
    }

    #[test]
    fn default_configuration() {
        let configuration = UartConfiguration::DEFAULT;
        assert_eq!(
            configuration.divisors,
            BaudDivisors {
                integer: 27,
                fractional: 8
            }
        );
        assert_eq!(configuration.data_bits, DataBits::Eight);
        assert_eq!(configuration.stop_bits, StopBits::One);
        assert_eq!(configuration.parity, None);
        assert!(configuration.fifos);
    }
}

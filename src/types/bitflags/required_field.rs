use bitflags::bitflags;

bitflags! {
    /// Fields a [`crate::WeatherRecord`] must carry to count as complete.
    /// Each [`crate::Dataset`] defines its own requirement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RequiredField: u32 {
        const TEMPERATURE_MAX     = 1 << 0;
        const TEMPERATURE_MIN     = 1 << 1;
        const TEMPERATURE_AVERAGE = 1 << 2;
        const PRECIPITATION       = 1 << 3;

        /// Requires every field.
        const ALL = Self::TEMPERATURE_MAX.bits()
                  | Self::TEMPERATURE_MIN.bits()
                  | Self::TEMPERATURE_AVERAGE.bits()
                  | Self::PRECIPITATION.bits();

        /// Requires nothing.
        const NONE = 0;
    }
}

impl Default for RequiredField {
    fn default() -> Self {
        RequiredField::NONE
    }
}

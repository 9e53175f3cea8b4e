use serde::Deserialize;

/// Unit in which the hub reports and accepts temperatures. The assistant protocol always
/// exchanges Celsius values, the unit only changes what is displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn code(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// Converts a temperature reported by the hub into Celsius.
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => round_tenth((value - 32.0) * 5.0 / 9.0),
        }
    }

    /// Converts a Celsius temperature into the unit the hub expects.
    pub fn from_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => round_tenth(value * 9.0 / 5.0 + 32.0),
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TemperatureUnit::Celsius, 21.5, 21.5)]
    #[case(TemperatureUnit::Fahrenheit, 68.0, 20.0)]
    #[case(TemperatureUnit::Fahrenheit, 70.7, 21.5)]
    fn to_celsius(#[case] unit: TemperatureUnit, #[case] input: f64, #[case] expected: f64) {
        assert_eq!(unit.to_celsius(input), expected);
    }

    #[rstest]
    #[case(TemperatureUnit::Celsius, 21.5, 21.5)]
    #[case(TemperatureUnit::Fahrenheit, 20.0, 68.0)]
    #[case(TemperatureUnit::Fahrenheit, 21.5, 70.7)]
    fn from_celsius(#[case] unit: TemperatureUnit, #[case] input: f64, #[case] expected: f64) {
        assert_eq!(unit.from_celsius(input), expected);
    }
}

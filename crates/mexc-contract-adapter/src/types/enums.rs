/*
[INPUT]:  Integer codes used by MEXC contract history endpoints
[OUTPUT]: Typed Rust enums with code conversion and display labels
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new codes are added
*/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Failure to map a wire code or a user-supplied name onto an enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownCode {}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum PositionType {
    Long,
    Short,
}

impl PositionType {
    pub fn code(self) -> i32 {
        match self {
            PositionType::Long => 1,
            PositionType::Short => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(PositionType::Long),
            2 => Some(PositionType::Short),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PositionType::Long => "LONG",
            PositionType::Short => "SHORT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum OpenType {
    Isolated,
    Cross,
}

impl OpenType {
    pub fn code(self) -> i32 {
        match self {
            OpenType::Isolated => 1,
            OpenType::Cross => 2,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(OpenType::Isolated),
            2 => Some(OpenType::Cross),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OpenType::Isolated => "ISOLATED",
            OpenType::Cross => "CROSS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum PositionState {
    Holding,
    SystemHolding,
    Closed,
}

impl PositionState {
    pub fn code(self) -> i32 {
        match self {
            PositionState::Holding => 1,
            PositionState::SystemHolding => 2,
            PositionState::Closed => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(PositionState::Holding),
            2 => Some(PositionState::SystemHolding),
            3 => Some(PositionState::Closed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PositionState::Holding => "HOLDING",
            PositionState::SystemHolding => "SYSTEM_HOLDING",
            PositionState::Closed => "CLOSED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum OrderSide {
    OpenLong,
    CloseShort,
    OpenShort,
    CloseLong,
}

impl OrderSide {
    pub fn code(self) -> i32 {
        match self {
            OrderSide::OpenLong => 1,
            OrderSide::CloseShort => 2,
            OrderSide::OpenShort => 3,
            OrderSide::CloseLong => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(OrderSide::OpenLong),
            2 => Some(OrderSide::CloseShort),
            3 => Some(OrderSide::OpenShort),
            4 => Some(OrderSide::CloseLong),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderSide::OpenLong => "OPEN_LONG",
            OrderSide::CloseShort => "CLOSE_SHORT",
            OrderSide::OpenShort => "OPEN_SHORT",
            OrderSide::CloseLong => "CLOSE_LONG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum OrderCategory {
    Limit,
    SystemTakeOver,
    CloseDelegate,
    AdlReduction,
}

impl OrderCategory {
    pub fn code(self) -> i32 {
        match self {
            OrderCategory::Limit => 1,
            OrderCategory::SystemTakeOver => 2,
            OrderCategory::CloseDelegate => 3,
            OrderCategory::AdlReduction => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(OrderCategory::Limit),
            2 => Some(OrderCategory::SystemTakeOver),
            3 => Some(OrderCategory::CloseDelegate),
            4 => Some(OrderCategory::AdlReduction),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderCategory::Limit => "LIMIT",
            OrderCategory::SystemTakeOver => "SYSTEM_TAKE_OVER",
            OrderCategory::CloseDelegate => "CLOSE_DELEGATE",
            OrderCategory::AdlReduction => "ADL_REDUCTION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum OrderType {
    Limit,
    PostOnly,
    ImmediateOrCancel,
    FillOrKill,
    Market,
    MarketToLimit,
}

impl OrderType {
    pub fn code(self) -> i32 {
        match self {
            OrderType::Limit => 1,
            OrderType::PostOnly => 2,
            OrderType::ImmediateOrCancel => 3,
            OrderType::FillOrKill => 4,
            OrderType::Market => 5,
            OrderType::MarketToLimit => 6,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(OrderType::Limit),
            2 => Some(OrderType::PostOnly),
            3 => Some(OrderType::ImmediateOrCancel),
            4 => Some(OrderType::FillOrKill),
            5 => Some(OrderType::Market),
            6 => Some(OrderType::MarketToLimit),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::PostOnly => "POST_ONLY",
            OrderType::ImmediateOrCancel => "IOC",
            OrderType::FillOrKill => "FOK",
            OrderType::Market => "MARKET",
            OrderType::MarketToLimit => "MARKET_TO_LIMIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum OrderState {
    Uninformed,
    Uncompleted,
    Completed,
    Cancelled,
    Invalid,
}

impl OrderState {
    pub fn code(self) -> i32 {
        match self {
            OrderState::Uninformed => 1,
            OrderState::Uncompleted => 2,
            OrderState::Completed => 3,
            OrderState::Cancelled => 4,
            OrderState::Invalid => 5,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(OrderState::Uninformed),
            2 => Some(OrderState::Uncompleted),
            3 => Some(OrderState::Completed),
            4 => Some(OrderState::Cancelled),
            5 => Some(OrderState::Invalid),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderState::Uninformed => "UNINFORMED",
            OrderState::Uncompleted => "UNCOMPLETED",
            OrderState::Completed => "COMPLETED",
            OrderState::Cancelled => "CANCELLED",
            OrderState::Invalid => "INVALID",
        }
    }
}

// Wire conversions and name parsing shared by every coded enum.
macro_rules! coded_conversions {
    ($($ty:ident => $kind:literal),* $(,)?) => {
        $(
            impl TryFrom<i32> for $ty {
                type Error = UnknownCode;

                fn try_from(code: i32) -> Result<Self, Self::Error> {
                    $ty::from_code(code).ok_or_else(|| UnknownCode {
                        kind: $kind,
                        value: code.to_string(),
                    })
                }
            }

            impl From<$ty> for i32 {
                fn from(value: $ty) -> i32 {
                    value.code()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            /// Accepts either the numeric code or the label (`open-long`, `OPEN_LONG`)
            impl FromStr for $ty {
                type Err = UnknownCode;

                fn from_str(raw: &str) -> Result<Self, Self::Err> {
                    let unknown = || UnknownCode {
                        kind: $kind,
                        value: raw.to_string(),
                    };
                    if let Ok(code) = raw.trim().parse::<i32>() {
                        return $ty::try_from(code);
                    }
                    let wanted = normalize(raw);
                    (1..=16)
                        .filter_map($ty::from_code)
                        .find(|candidate| normalize(candidate.label()) == wanted)
                        .ok_or_else(unknown)
                }
            }
        )*
    };
}

coded_conversions!(
    PositionType => "position type",
    OpenType => "open type",
    PositionState => "position state",
    OrderSide => "order side",
    OrderCategory => "order category",
    OrderType => "order type",
    OrderState => "order state",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_labels() {
        assert_eq!(PositionType::from_code(1), Some(PositionType::Long));
        assert_eq!(OpenType::from_code(1).map(OpenType::label), Some("ISOLATED"));
        assert_eq!(OrderSide::CloseLong.code(), 4);
        assert_eq!(OrderType::from_code(7), None);
    }

    #[test]
    fn test_from_str_accepts_code_or_name() {
        assert_eq!("1".parse::<OrderSide>(), Ok(OrderSide::OpenLong));
        assert_eq!("open-long".parse::<OrderSide>(), Ok(OrderSide::OpenLong));
        assert_eq!("CLOSE_SHORT".parse::<OrderSide>(), Ok(OrderSide::CloseShort));
        assert_eq!("cancelled".parse::<OrderState>(), Ok(OrderState::Cancelled));
        assert_eq!("short".parse::<PositionType>(), Ok(PositionType::Short));

        let err = "sideways".parse::<OrderSide>().expect_err("unknown side");
        assert_eq!(err.to_string(), "unknown order side 'sideways'");
        assert!("9".parse::<OrderCategory>().is_err());
    }

    #[test]
    fn test_serde_uses_numeric_codes() {
        let side: OrderSide = serde_json::from_str("3").expect("side");
        assert_eq!(side, OrderSide::OpenShort);
        assert_eq!(serde_json::to_string(&OrderState::Completed).expect("state"), "3");
        assert!(serde_json::from_str::<OrderCategory>("0").is_err());
    }
}

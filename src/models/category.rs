//! Transaction types and the fixed category table
//!
//! Categories form a closed set. Each one has a stable integer code (used in
//! the data file), a slug (used on the command line) and a localized display
//! label shown to users.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label for category codes outside the table
pub const UNKNOWN_CATEGORY_LABEL: &str = "未知";

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Expense, TransactionType::Income];

    pub const fn code(&self) -> i32 {
        match self {
            Self::Expense => 0,
            Self::Income => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Expense => "支出",
            Self::Income => "收入",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.slug())
    }
}

impl From<TransactionType> for i32 {
    fn from(kind: TransactionType) -> Self {
        kind.code()
    }
}

impl TryFrom<i32> for TransactionType {
    type Error = CodeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(CodeError::UnknownType(code))
    }
}

impl FromStr for TransactionType {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Self::try_from(code);
        }
        Self::ALL
            .into_iter()
            .find(|t| t.slug().eq_ignore_ascii_case(s) || t.label() == s)
            .ok_or_else(|| CodeError::UnknownName(s.to_string()))
    }
}

macro_rules! define_categories {
    ($( $variant:ident = $code:literal, $slug:literal, $label:literal; )+) => {
        /// Closed set of transaction categories
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum Category {
            $( $variant, )+
        }

        impl Category {
            /// Every category, in code order
            pub const ALL: &'static [Category] = &[ $( Category::$variant, )+ ];

            pub const fn code(&self) -> i32 {
                match self {
                    $( Self::$variant => $code, )+
                }
            }

            pub const fn slug(&self) -> &'static str {
                match self {
                    $( Self::$variant => $slug, )+
                }
            }

            /// Localized display label
            pub const fn label(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            pub const fn variant_name(&self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }
        }
    };
}

define_categories! {
    Food = 0, "food", "餐饮";
    Transport = 1, "transport", "交通";
    Shopping = 2, "shopping", "购物";
    Housing = 3, "housing", "住房";
    Utilities = 4, "utilities", "水电煤";
    Communication = 5, "communication", "通讯";
    Entertainment = 6, "entertainment", "娱乐";
    Medical = 7, "medical", "医疗";
    Education = 8, "education", "教育";
    Travel = 9, "travel", "旅行";
    Clothing = 10, "clothing", "服饰";
    Social = 11, "social", "人情往来";
    Pets = 12, "pets", "宠物";
    OtherExpense = 13, "other-expense", "其他支出";
    Salary = 14, "salary", "工资";
    Bonus = 15, "bonus", "奖金";
    Investment = 16, "investment", "投资收益";
    PartTime = 17, "part-time", "兼职";
    OtherIncome = 18, "other-income", "其他收入";
}

impl Category {
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// The type a category is normally used with
    pub fn usual_type(&self) -> TransactionType {
        match self {
            Self::Salary | Self::Bonus | Self::Investment | Self::PartTime | Self::OtherIncome => {
                TransactionType::Income
            }
            _ => TransactionType::Expense,
        }
    }
}

/// Display label for a raw category code; unknown codes get
/// [`UNKNOWN_CATEGORY_LABEL`].
pub fn category_name(code: i32) -> &'static str {
    Category::from_code(code)
        .map(|c| c.label())
        .unwrap_or(UNKNOWN_CATEGORY_LABEL)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl From<Category> for i32 {
    fn from(category: Category) -> Self {
        category.code()
    }
}

impl TryFrom<i32> for Category {
    type Error = CodeError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(CodeError::UnknownCategory(code))
    }
}

impl FromStr for Category {
    type Err = CodeError;

    /// Accepts the integer code, the slug, the variant name or the label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Self::try_from(code);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| {
                c.slug().eq_ignore_ascii_case(s)
                    || c.variant_name().eq_ignore_ascii_case(s)
                    || c.label() == s
            })
            .ok_or_else(|| CodeError::UnknownName(s.to_string()))
    }
}

/// Error for codes or names outside the closed sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    UnknownType(i32),
    UnknownCategory(i32),
    UnknownName(String),
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeError::UnknownType(code) => write!(f, "Unknown transaction type code: {}", code),
            CodeError::UnknownCategory(code) => write!(f, "Unknown category code: {}", code),
            CodeError::UnknownName(name) => write!(f, "Unknown name: '{}'", name),
        }
    }
}

impl std::error::Error for CodeError {}

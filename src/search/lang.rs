use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Display language. The front end only ever toggles between these two.
#[derive(Debug, Serialize, Deserialize, ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ar,
}

/// Column headers for rendered work-item listings.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub title: &'static str,
    pub code: &'static str,
    pub description: &'static str,
    pub quantity: &'static str,
    pub unit: &'static str,
    pub amount: &'static str,
    pub attachments: &'static str,
}

static EN_LABELS: Labels = Labels {
    title: "Work items",
    code: "Code",
    description: "Description",
    quantity: "Quantity",
    unit: "Unit",
    amount: "Amount",
    attachments: "Files",
};

static AR_LABELS: Labels = Labels {
    title: "بنود الأعمال",
    code: "الرمز",
    description: "الوصف",
    quantity: "الكمية",
    unit: "الوحدة",
    amount: "المبلغ",
    attachments: "الملفات",
};

impl Lang {
    pub fn toggle(self) -> Self {
        match self {
            Lang::En => Lang::Ar,
            Lang::Ar => Lang::En,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Lang::Ar)
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ar => "ar",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Lang::En => &EN_LABELS,
            Lang::Ar => &AR_LABELS,
        }
    }
}

use crate::tax::au::cgt_schedule_threshold;
use crate::tax::cgt::CgtInputs;
use rust_decimal::Decimal;
use serde::Serialize;

/// Advisory notices raised alongside a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Notice {
    /// Current year gains or losses exceed $10,000, so a CGT schedule
    /// must be lodged with the return.
    CgtScheduleRequired {
        gains: Decimal,
        losses: Decimal,
    },
}

impl Notice {
    pub fn for_inputs(inputs: &CgtInputs) -> Vec<Notice> {
        let threshold = cgt_schedule_threshold();
        let gains = inputs.total_gains();
        let losses = inputs.current_year_losses();

        let mut notices = Vec::new();
        if gains > threshold || losses > threshold {
            notices.push(Notice::CgtScheduleRequired { gains, losses });
        }
        notices
    }

    pub fn message(&self) -> String {
        match self {
            Notice::CgtScheduleRequired { gains, losses } => format!(
                "Capital gains of {} and current year losses of {}: a CGT schedule is required when either exceeds {}",
                crate::money::format_aud(*gains),
                crate::money::format_aud(*losses),
                crate::money::format_aud(cgt_schedule_threshold()),
            ),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn no_notice_at_threshold() {
        let inputs = CgtInputs::new(dec!(0), dec!(10000), dec!(4000), dec!(6000));
        assert!(Notice::for_inputs(&inputs).is_empty());
    }

    #[test]
    fn gains_over_threshold() {
        let inputs = CgtInputs::new(dec!(0), dec!(0), dec!(4000), dec!(6000.01));
        assert_eq!(
            Notice::for_inputs(&inputs),
            vec![Notice::CgtScheduleRequired {
                gains: dec!(10000.01),
                losses: dec!(0),
            }]
        );
    }

    #[test]
    fn current_year_losses_over_threshold() {
        let inputs = CgtInputs::new(dec!(0), dec!(12000), dec!(0), dec!(0));
        assert_eq!(Notice::for_inputs(&inputs).len(), 1);
    }

    #[test]
    fn prior_losses_alone_do_not_require_schedule() {
        let inputs = CgtInputs::new(dec!(50000), dec!(0), dec!(0), dec!(0));
        assert!(Notice::for_inputs(&inputs).is_empty());
    }

    #[test]
    fn largest_gains_still_raise_notice() {
        let inputs = CgtInputs::new(dec!(0), dec!(0), Decimal::MAX, Decimal::MAX);
        assert_eq!(
            Notice::for_inputs(&inputs),
            vec![Notice::CgtScheduleRequired {
                gains: Decimal::MAX,
                losses: dec!(0),
            }]
        );
    }

    #[test]
    fn message_mentions_threshold() {
        let notice = Notice::CgtScheduleRequired {
            gains: dec!(15000),
            losses: dec!(0),
        };
        assert!(notice.to_string().contains("$10,000.00"));
        assert!(notice.to_string().contains("$15,000.00"));
    }
}

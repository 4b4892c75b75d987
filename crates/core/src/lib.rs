pub mod money;
pub mod period;
pub mod summary;
pub mod transaction;

pub use money::Money;
pub use period::DateRange;
pub use summary::{
    build_summary, group_by_type, group_kind, GroupKind, Summary, SummaryError, TransactionGroup,
};
pub use transaction::{parse_row, parse_rows, parse_rows_with_errors, ParseError, RawRow, Transaction};

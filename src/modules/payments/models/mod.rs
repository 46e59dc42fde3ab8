mod payment_record;

pub use payment_record::{parse_payment_date, PaymentInput, PaymentRecord, MAX_METHOD_LEN};

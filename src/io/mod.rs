/// CSV export of hourly detail and candidate sweeps.
pub mod export;

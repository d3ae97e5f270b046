mod sql;

/// Monthly MGNREGA statistics per district, from the [data.gov.in] open-data
/// API.
///
/// [data.gov.in]: https://www.data.gov.in/
pub mod data_gov;

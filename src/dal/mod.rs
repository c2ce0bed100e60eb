pub mod company_csv;

pub mod company;
pub mod corpus;
pub mod html_page;
pub mod keyword;

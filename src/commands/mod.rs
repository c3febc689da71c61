pub mod answer;
pub mod demo;

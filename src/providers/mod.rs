pub mod cnb;

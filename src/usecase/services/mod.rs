pub mod convert_service;

mod document_tests;
mod layout_tests;
mod scheduler_tests;
mod width_tests;

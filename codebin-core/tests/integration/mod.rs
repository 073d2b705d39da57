mod http_client_tests;
mod session_tests;

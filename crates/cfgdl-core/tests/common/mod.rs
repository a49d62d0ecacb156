pub mod console_server;

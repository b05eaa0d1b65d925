// Integration tests for camview commands against a stubbed backend

mod support;

mod commands {
    mod access;
    mod session;
    mod settings;
    mod views;
    mod watch;
}

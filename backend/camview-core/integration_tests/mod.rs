mod support;

mod auth {
    mod fetch;
    mod session;
}

mod api {
    mod views;
}

mod live {
    mod websocket;
}

mod config {
    mod env;
}

mod helpers;
mod login_test;
mod router_test;

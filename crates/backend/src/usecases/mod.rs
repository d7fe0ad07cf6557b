pub mod u101_notify_order;

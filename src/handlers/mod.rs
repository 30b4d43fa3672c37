//! API handlers for the portfolio server

pub mod health;
pub mod stock;
pub mod user;

pub use health::{health_check, root};
pub use stock::{create_stock, delete_stock, get_stock, list_stocks, update_stock};
pub use user::{
    create_user, create_user_stock, delete_user, get_user, get_user_portfolio, list_user_stocks,
    list_users, update_user,
};

pub mod dto;

pub use dto::{
    Order, OrderCustomer, OrderItem, OrderStatus, OrdersListResponse, StatusUpdateRequest,
};

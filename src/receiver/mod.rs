pub mod gesture_receiver;

pub use gesture_receiver::GestureReceiver;

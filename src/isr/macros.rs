/// Declares a `static` shared ring buffer protected by a `critical_section` mutex.
///
/// The capacity defaults to [`QUEUE_CAPACITY`](crate::consts::QUEUE_CAPACITY).
///
/// # Arguments
/// - `$name`: The name of the static
/// - `$cap`: Optional capacity in bytes
///
/// # Example
/// ```rust
/// xbee_api::init_rx_queue!(RX_QUEUE);
/// xbee_api::init_rx_queue!(TX_QUEUE, 256);
/// ```
#[macro_export]
macro_rules! init_rx_queue {
    ( $name:ident ) => {
        $crate::init_rx_queue!($name, $crate::consts::QUEUE_CAPACITY);
    };
    ( $name:ident, $cap:expr ) => {
        pub static $name: $crate::isr::SharedRingBuffer<{ $cap }> =
            $crate::isr::global_queue_init::<{ $cap }>();
    };
}

/// Enqueues one byte into a queue declared with [`init_rx_queue!`](crate::init_rx_queue).
///
/// Evaluates to the [`Result`](crate::error::Result) of the push, so the
/// interrupt handler can count dropped bytes.
///
/// # Example
/// ```rust
/// xbee_api::init_rx_queue!(RX_QUEUE);
///
/// fn usart_rx(byte: u8) {
///     let _ = xbee_api::enqueue_rx_byte!(RX_QUEUE, byte);
/// }
/// # usart_rx(0x7e);
/// ```
#[macro_export]
macro_rules! enqueue_rx_byte {
    ( $name:ident, $byte:expr ) => {
        $crate::isr::global_enqueue(&$name, $byte)
    };
}

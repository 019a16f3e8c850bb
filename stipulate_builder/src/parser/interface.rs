use crate::parser::{ErrorContext, ParseError};

/// Where the command line parser sends its output.
pub(crate) trait UserInterface {
    /// Print a line of regular output (ex: help).
    fn print(&self, message: String);

    /// Print the reason parsing failed.
    fn print_error(&self, error: ParseError);

    /// Print where in the input tokens parsing failed.
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::parser::{ErrorContext, ParseError, UserInterface};
    use std::sync::mpsc;

    enum Event {
        Message(String),
        Error(String),
        ErrorContext(ErrorContext),
    }

    /// A user interface whose output can be inspected after the parser (which owns the sender) is done.
    pub(crate) fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (tx, rx) = mpsc::channel();
        (SenderInterface { tx }, ReceiverInterface { rx })
    }

    pub(crate) struct SenderInterface {
        tx: mpsc::Sender<Event>,
    }

    impl UserInterface for SenderInterface {
        fn print(&self, message: String) {
            self.tx.send(Event::Message(message)).unwrap();
        }

        fn print_error(&self, error: ParseError) {
            self.tx.send(Event::Error(error.to_string())).unwrap();
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            self.tx.send(Event::ErrorContext(error_context)).unwrap();
        }
    }

    pub(crate) struct ReceiverInterface {
        rx: mpsc::Receiver<Event>,
    }

    impl ReceiverInterface {
        /// Take everything printed so far: the (joined) messages, the error and the error context.
        pub(crate) fn consume(self) -> (Option<String>, Option<String>, Option<ErrorContext>) {
            let mut messages = Vec::default();
            let mut error = None;
            let mut error_context = None;

            for event in self.rx.try_iter() {
                match event {
                    Event::Message(message) => messages.push(message),
                    // Only the first error (and its context) is kept.
                    Event::Error(message) => {
                        error.get_or_insert(message);
                    }
                    Event::ErrorContext(context) => {
                        error_context.get_or_insert(context);
                    }
                }
            }

            let message = if messages.is_empty() {
                None
            } else {
                Some(messages.join("\n"))
            };

            (message, error, error_context)
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error, error_context) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            message.unwrap()
        }
    }
}

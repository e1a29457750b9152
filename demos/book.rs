//! A publisher exposing three channels, and a few subscribers.
use eventdispatch::EventDispatch;
use std::mem::replace;

struct Book {
    title: String,
    price: f64,
    on_title_change: EventDispatch<String>,
    on_price_change: EventDispatch<f64>,
    on_sale: EventDispatch<()>,
}

impl Book {
    fn new(title: &str, price: f64) -> Self {
        Self {
            title: title.to_string(),
            price,
            on_title_change: EventDispatch::named("title"),
            on_price_change: EventDispatch::named("price"),
            on_sale: EventDispatch::named("sale"),
        }
    }

    fn set_title(&mut self, title: &str) {
        let old = replace(&mut self.title, title.to_string());
        self.on_title_change.notify_if_changed(&old, &self.title);
    }

    fn set_price(&mut self, price: f64) {
        let old = replace(&mut self.price, price);
        self.on_price_change.notify_if_changed(&old, &self.price);
        // Price went down.
        if self.price < old {
            self.on_sale.notify_unit();
        }
    }
}

fn main() {
    let mut book = Book::new("Pride and Prejudice", 30.0);

    book.on_sale.add_handler(|_| println!("the book is on sale"));
    book.on_title_change
        .add_handler(|title| println!("renamed to {:?}", title));
    let id = book
        .on_price_change
        .add_handler(|price| println!("price is now {}", price));
    book.on_price_change
        .handle_once(|price| println!("first price change: {}", price));

    book.set_price(35.0);
    book.set_price(40.0);
    book.set_price(35.0); // on sale
    book.set_price(40.0);
    book.set_price(35.0); // on sale
    book.set_price(30.0); // on sale

    book.on_price_change.remove_handler(id);
    book.set_price(20.0); // on sale, price no longer printed

    book.set_title("Pride and Prejudice");
    book.set_title("Emma");
}

use eventdispatch::EventDispatch;
use std::{cell::RefCell, mem::replace, rc::Rc};

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
        if self.price < old {
            self.on_sale.notify_unit();
        }
    }
}

#[test]
fn sale_fires_on_every_decrease() {
    let mut book = Book::new("Pride and Prejudice", 30.0);
    let sales = Rc::new(RefCell::new(0));
    {
        let sales = sales.clone();
        book.on_sale.add_handler(move |_| *sales.borrow_mut() += 1);
    }

    book.set_price(35.0);
    assert_eq!(*sales.borrow(), 0);

    book.set_price(25.0);
    assert_eq!(*sales.borrow(), 1);

    book.set_price(20.0);
    assert_eq!(*sales.borrow(), 2);
}

#[test]
fn price_changes_are_reported_once_per_change() {
    let mut book = Book::new("Emma", 30.0);
    let prices = Rc::new(RefCell::new(Vec::new()));
    {
        let prices = prices.clone();
        book.on_price_change
            .add_handler(move |price| prices.borrow_mut().push(*price));
    }

    book.set_price(35.0);
    book.set_price(35.0);
    book.set_price(40.0);
    book.set_price(35.0);

    assert_eq!(*prices.borrow(), vec![35.0, 40.0, 35.0]);
}

#[test]
fn title_subscription_can_be_dropped() {
    let mut book = Book::new("Persuasion", 12.5);
    let titles = Rc::new(RefCell::new(Vec::new()));
    let id = {
        let titles = titles.clone();
        book.on_title_change
            .add_handler(move |title| titles.borrow_mut().push(title.clone()))
    };

    book.set_title("Persuasion");
    book.set_title("Sense and Sensibility");
    assert!(book.on_title_change.remove_handler(id));
    book.set_title("Mansfield Park");

    assert_eq!(*titles.borrow(), vec!["Sense and Sensibility".to_string()]);
    assert!(!book.on_title_change.remove_handler(id));
}

#[test]
fn first_sale_only() {
    let mut book = Book::new("Northanger Abbey", 30.0);
    let prices = Rc::new(RefCell::new(Vec::new()));
    {
        let prices = prices.clone();
        book.on_price_change
            .handle_once(move |price| prices.borrow_mut().push(*price));
    }

    book.set_price(30.0);
    book.set_price(28.0);
    book.set_price(26.0);

    assert_eq!(*prices.borrow(), vec![28.0]);
    assert!(book.on_price_change.is_empty());
}

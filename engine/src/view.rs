use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::board::{Board, LayoutError, Side};
use crate::moves::Move;

/// Told after every change to an observed board. Observers read the board
/// themselves, the notification carries nothing.
pub trait BoardObserver {
    fn board_changed(&self);
}

/// Board mutations shared by the observable board and its read-only view.
pub trait MutableBoard {
    fn clear(&self);
    fn set_pieces(&self, layout: &str, to_move: Side) -> Result<(), LayoutError>;
    fn make_move(&self, mve: &Move);
}

#[derive(Default)]
struct ObserverList(RefCell<Vec<Weak<dyn BoardObserver>>>);

impl ObserverList {
    fn add<T: BoardObserver + 'static>(&self, observer: &Rc<T>) {
        let observer: Rc<dyn BoardObserver> = observer.clone();
        self.0.borrow_mut().push(Rc::downgrade(&observer));
    }

    fn notify(&self) {
        // Collect first so observers may register others while being notified.
        let live = {
            let mut observers = self.0.borrow_mut();
            observers.retain(|observer| observer.strong_count() > 0);
            observers
                .iter()
                .filter_map(Weak::upgrade)
                .collect::<Vec<_>>()
        };
        for observer in live {
            observer.board_changed();
        }
    }

    fn len(&self) -> usize {
        self.0.borrow().len()
    }
}

/// A board that notifies its observers after every mutation.
pub struct ObservableBoard {
    board: RefCell<Board>,
    observers: ObserverList,
}

impl ObservableBoard {
    pub fn new(board: Board) -> Rc<Self> {
        Rc::new(Self {
            board: RefCell::new(board),
            observers: ObserverList::default(),
        })
    }

    pub fn board(&self) -> Ref<'_, Board> {
        self.board.borrow()
    }

    pub fn add_observer<T: BoardObserver + 'static>(&self, observer: &Rc<T>) {
        self.observers.add(observer);
    }

    pub fn num_observers(&self) -> usize {
        self.observers.len()
    }
}

impl MutableBoard for ObservableBoard {
    fn clear(&self) {
        self.board.borrow_mut().clear();
        self.observers.notify();
    }

    fn set_pieces(&self, layout: &str, to_move: Side) -> Result<(), LayoutError> {
        self.board.borrow_mut().set_pieces(layout, to_move)?;
        self.observers.notify();
        Ok(())
    }

    /// Panics on an illegal move, in release builds too, before touching
    /// the board or notifying anyone.
    fn make_move(&self, mve: &Move) {
        {
            let mut board = self.board.borrow_mut();
            assert!(
                board.is_legal(mve),
                "illegal move {} for {}",
                mve,
                board.to_move()
            );
            board.make_move(mve);
        }
        self.observers.notify();
    }
}

/// Read-only window onto an `ObservableBoard`. Forwards the source's
/// notifications to its own observers; every mutation panics.
pub struct BoardView {
    source: Rc<ObservableBoard>,
    observers: ObserverList,
}

impl BoardView {
    pub fn new(source: &Rc<ObservableBoard>) -> Rc<Self> {
        let view = Rc::new(Self {
            source: Rc::clone(source),
            observers: ObserverList::default(),
        });
        source.add_observer(&view);
        view
    }

    pub fn board(&self) -> Ref<'_, Board> {
        self.source.board()
    }

    pub fn add_observer<T: BoardObserver + 'static>(&self, observer: &Rc<T>) {
        self.observers.add(observer);
    }
}

impl BoardObserver for BoardView {
    fn board_changed(&self) {
        self.observers.notify();
    }
}

impl MutableBoard for BoardView {
    fn clear(&self) {
        panic!("board view is read-only: clear");
    }

    fn set_pieces(&self, _layout: &str, _to_move: Side) -> Result<(), LayoutError> {
        panic!("board view is read-only: set_pieces");
    }

    fn make_move(&self, mve: &Move) {
        panic!("board view is read-only: make_move {}", mve);
    }
}

use std::iter::{Cycle, Peekable};

use smallvec::{IntoIter, SmallVec};

/// Anything that can occupy a seat in the turn cycle.
pub trait Player {
    type Id;

    fn id(&self) -> Self::Id;
}

/// Turn order over a fixed set of seated players.
pub trait PlayerQueue {
    type Id: PartialEq;
    type Item: Player<Id = Self::Id>;

    fn as_slice(&self) -> &[Self::Item];

    /// Peeks the player whose turn it is without advancing the cycle.
    fn get_current(&mut self) -> Option<&Self::Item>;

    /// Advances the cycle by one and returns the new current player.
    fn next(&mut self) -> Option<&Self::Item>;

    fn find(&self, id: Self::Id) -> Option<&Self::Item> {
        self.as_slice().iter().find(|player| player.id() == id)
    }

    fn find_if<F>(&self, f: F) -> Option<&Self::Item>
    where
        F: FnMut(&&Self::Item) -> bool,
    {
        self.as_slice().iter().find(f)
    }
}

/// Endless cycle over the seated players. Two seats inline; more spill.
#[derive(Debug)]
pub struct PlayerPool<T: Clone> {
    players: SmallVec<[T; 2]>,
    queue: Peekable<Cycle<IntoIter<[T; 2]>>>,
}

impl<T: Clone> PlayerPool<T> {
    pub fn new(players: Vec<T>) -> Self {
        let players = SmallVec::from_vec(players);
        Self {
            players: players.clone(),
            queue: players.into_iter().cycle().peekable(),
        }
    }
}

impl<T, ID> PlayerQueue for PlayerPool<T>
where
    T: Clone + Player<Id = ID>,
    ID: PartialEq,
{
    type Id = ID;
    type Item = T;

    fn as_slice(&self) -> &[T] {
        self.players.as_slice()
    }

    /// &mut self is needed because Peekable can call next() on the
    /// underlying iterator.
    fn get_current(&mut self) -> Option<&T> {
        self.queue.peek()
    }

    fn next(&mut self) -> Option<&T> {
        self.queue.next()?;
        self.queue.peek()
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

//! Incremental tracking of stone groups and their liberties
//!
//! Every occupied point belongs to exactly one group. Groups are created,
//! merged and removed as stones come and go, so the whole board never has
//! to be rescanned during normal play. [`GroupTracker::rebuild`] exists for
//! history navigation, where the grid is rewritten wholesale.

use crate::grid::Grid;
use crate::{Color, Coord, GameError};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Opaque group identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A maximal set of connected same-color stones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    color: Color,
    stones: HashSet<Coord>,
    liberties: HashSet<Coord>,
}

impl Group {
    /// Color shared by every stone of the group
    pub fn color(&self) -> Color {
        self.color
    }

    /// Points occupied by the group
    pub fn stones(&self) -> &HashSet<Coord> {
        &self.stones
    }

    /// Empty points adjacent to any stone of the group
    pub fn liberties(&self) -> &HashSet<Coord> {
        &self.liberties
    }
}

/// Maps stones to groups and groups to their stones and liberties
#[derive(Debug, Clone, Default)]
pub struct GroupTracker {
    owner: HashMap<Coord, GroupId>,
    groups: HashMap<GroupId, Group>,
    next_id: u32,
}

impl GroupTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Group containing the stone at `coord`
    pub fn group_at(&self, coord: Coord) -> Option<GroupId> {
        self.owner.get(&coord).copied()
    }

    /// Look up a group
    pub fn group(&self, id: GroupId) -> Result<&Group, GameError> {
        self.groups.get(&id).ok_or(GameError::UnknownGroup(id))
    }

    /// Stones of a group
    pub fn stones(&self, id: GroupId) -> Result<&HashSet<Coord>, GameError> {
        self.group(id).map(Group::stones)
    }

    /// Liberties of a group
    pub fn liberties(&self, id: GroupId) -> Result<&HashSet<Coord>, GameError> {
        self.group(id).map(Group::liberties)
    }

    /// Iterate over all live groups
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups.iter().map(|(id, group)| (*id, group))
    }

    /// Number of live groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group is tracked
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Forget every group
    pub fn clear(&mut self) {
        self.owner.clear();
        self.groups.clear();
        self.next_id = 0;
    }

    /// Start a singleton group for a stone that touches no friendly stone
    pub fn create_group(&mut self, coord: Coord, color: Color, grid: &Grid) -> GroupId {
        let id = GroupId(self.next_id);
        self.next_id += 1;

        let liberties = empty_neighbors(coord, grid).collect();
        self.owner.insert(coord, id);
        self.groups.insert(
            id,
            Group {
                color,
                stones: HashSet::from([coord]),
                liberties,
            },
        );
        id
    }

    /// Join the given groups and the new stone into one group.
    ///
    /// The surviving id is the smallest of `ids`, whatever order they come
    /// in. An empty `ids` degenerates to [`GroupTracker::create_group`].
    pub fn merge_groups(
        &mut self,
        ids: &[GroupId],
        new_stone: Coord,
        color: Color,
        grid: &Grid,
    ) -> Result<GroupId, GameError> {
        let Some(&target) = ids.iter().min() else {
            return Ok(self.create_group(new_stone, color, grid));
        };
        if let Some(missing) = ids.iter().find(|id| !self.groups.contains_key(*id)) {
            return Err(GameError::UnknownGroup(*missing));
        }

        let mut merged = self
            .groups
            .remove(&target)
            .ok_or(GameError::UnknownGroup(target))?;
        for id in ids.iter().filter(|id| **id != target) {
            if let Some(group) = self.groups.remove(id) {
                merged.stones.extend(group.stones);
                merged.liberties.extend(group.liberties);
            }
        }

        merged.stones.insert(new_stone);
        merged.liberties.remove(&new_stone);
        merged.liberties.extend(empty_neighbors(new_stone, grid));

        for stone in &merged.stones {
            self.owner.insert(*stone, target);
        }
        tracing::trace!(
            group = %target,
            merged = ids.len(),
            stones = merged.stones.len(),
            "groups merged"
        );
        self.groups.insert(target, merged);
        Ok(target)
    }

    /// Drop a group and unmap its stones, returning what was removed
    pub fn remove_group(&mut self, id: GroupId) -> Result<Group, GameError> {
        let group = self.groups.remove(&id).ok_or(GameError::UnknownGroup(id))?;
        for stone in &group.stones {
            self.owner.remove(stone);
        }
        tracing::trace!(group = %id, stones = group.stones.len(), "group removed");
        Ok(group)
    }

    /// Fix up neighboring groups after a stone of `color` landed on `coord`.
    ///
    /// Every adjacent group loses `coord` as a liberty; friendly ones pick up
    /// the empty neighbors of `coord`. Nothing is deleted here: the ids of
    /// opponent groups left without liberties are returned to the caller.
    pub fn update_adjacent_liberties(
        &mut self,
        coord: Coord,
        color: Color,
        grid: &Grid,
    ) -> Result<Vec<GroupId>, GameError> {
        let mut adjacent: Vec<GroupId> = coord
            .neighbors()
            .iter()
            .filter_map(|n| self.group_at(*n))
            .collect();
        adjacent.sort_unstable();
        adjacent.dedup();

        let mut dead = Vec::new();
        for id in adjacent {
            let group = self.groups.get_mut(&id).ok_or(GameError::UnknownGroup(id))?;
            group.liberties.remove(&coord);
            if group.color == color {
                group.liberties.extend(empty_neighbors(coord, grid));
            } else if group.liberties.is_empty() {
                dead.push(id);
            }
        }
        Ok(dead)
    }

    /// Hand freed points back as liberties to the groups around them.
    ///
    /// Used after captured stones were cleared from the grid.
    pub fn release_liberties<'a>(&mut self, freed: impl IntoIterator<Item = &'a Coord>) {
        for point in freed {
            for n in point.neighbors() {
                if let Some(id) = self.owner.get(&n) {
                    if let Some(group) = self.groups.get_mut(id) {
                        group.liberties.insert(*point);
                    }
                }
            }
        }
    }

    /// Recompute every group from the grid contents
    pub fn rebuild(&mut self, grid: &Grid) {
        self.clear();
        for (start, color) in grid.stones() {
            if self.owner.contains_key(&start) {
                continue;
            }

            let id = GroupId(self.next_id);
            self.next_id += 1;

            let mut stones = HashSet::new();
            let mut liberties = HashSet::new();
            let mut queue = vec![start];
            while let Some(current) = queue.pop() {
                if !stones.insert(current) {
                    continue;
                }
                for n in current.neighbors() {
                    match grid.get(n).color() {
                        Some(c) if c == color && !stones.contains(&n) => queue.push(n),
                        None if grid.is_empty(n) => {
                            liberties.insert(n);
                        }
                        _ => {}
                    }
                }
            }

            for stone in &stones {
                self.owner.insert(*stone, id);
            }
            self.groups.insert(
                id,
                Group {
                    color,
                    stones,
                    liberties,
                },
            );
        }
        tracing::trace!(groups = self.groups.len(), "groups rebuilt from grid");
    }
}

fn empty_neighbors(coord: Coord, grid: &Grid) -> impl Iterator<Item = Coord> + '_ {
    coord.neighbors().into_iter().filter(|n| grid.is_empty(*n))
}

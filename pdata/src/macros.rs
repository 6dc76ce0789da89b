//! Declarative macros generating the view wrappers.
//!
//! Every record in the tree gets a pair of views: a shared one (`Foo<'a>`,
//! `Copy`, holds `&'a T`) and an exclusive one (`FooMut<'a>`, holds
//! `&'a mut T`). Repeated fields get the same pair as slice views.

/// Declares the shared/exclusive view pair over one record type.
macro_rules! pdata_view {
    ($(#[$meta:meta])* $view:ident, $view_mut:ident, $orig:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $view<'a> {
            orig: &'a $orig,
        }

        $(#[$meta])*
        pub struct $view_mut<'a> {
            orig: &'a mut $orig,
        }

        impl<'a> $view<'a> {
            pub(crate) fn new(orig: &'a $orig) -> Self {
                Self { orig }
            }
        }

        impl<'a> $view_mut<'a> {
            pub(crate) fn new(orig: &'a mut $orig) -> Self {
                Self { orig }
            }

            /// Shared view over the same record.
            pub fn as_view(&self) -> $view<'_> {
                $view::new(self.orig)
            }
        }

        impl PartialEq for $view<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.orig == other.orig
            }
        }

        impl std::fmt::Debug for $view<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Debug::fmt(self.orig, f)
            }
        }

        impl std::fmt::Debug for $view_mut<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Debug::fmt(&*self.orig, f)
            }
        }
    };
}

/// Field getters on both views and setters on the exclusive one.
///
/// Groups must appear in order: `copy` (scalars), `string`, `slice`
/// (repeated scalars and bytes), `nested` (child views).
macro_rules! pdata_accessors {
    (
        $view:ident, $view_mut:ident {
            $( copy $cfield:ident, $csetter:ident: $cty:ty; )*
            $( string $sfield:ident, $ssetter:ident; )*
            $( slice $lfield:ident, $lsetter:ident: $lty:ty; )*
            $( nested $nfield:ident, $nfield_mut:ident: $nview:ident, $nview_mut:ident; )*
        }
    ) => {
        impl<'a> $view<'a> {
            $(
                pub fn $cfield(&self) -> $cty {
                    self.orig.$cfield
                }
            )*
            $(
                pub fn $sfield(&self) -> &'a str {
                    &self.orig.$sfield
                }
            )*
            $(
                pub fn $lfield(&self) -> &'a [$lty] {
                    &self.orig.$lfield
                }
            )*
            $(
                pub fn $nfield(&self) -> $nview<'a> {
                    $nview::new(&self.orig.$nfield)
                }
            )*
        }

        impl $view_mut<'_> {
            $(
                pub fn $cfield(&self) -> $cty {
                    self.orig.$cfield
                }

                pub fn $csetter(&mut self, value: $cty) {
                    self.orig.$cfield = value;
                }
            )*
            $(
                pub fn $sfield(&self) -> &str {
                    &self.orig.$sfield
                }

                pub fn $ssetter(&mut self, value: impl Into<String>) {
                    self.orig.$sfield = value.into();
                }
            )*
            $(
                pub fn $lfield(&self) -> &[$lty] {
                    &self.orig.$lfield
                }

                pub fn $lsetter(&mut self, value: Vec<$lty>) {
                    self.orig.$lfield = value;
                }
            )*
            $(
                pub fn $nfield(&self) -> $nview<'_> {
                    $nview::new(&self.orig.$nfield)
                }

                pub fn $nfield_mut(&mut self) -> $nview_mut<'_> {
                    $nview_mut::new(&mut self.orig.$nfield)
                }
            )*
        }
    };
}

/// Declares the shared/exclusive slice views over a repeated field.
///
/// The element views must provide `new` and `copy_to`.
macro_rules! pdata_slice {
    (
        $(#[$meta:meta])*
        $slice:ident, $slice_mut:ident, $elem:ident, $elem_mut:ident, $orig:ty
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $slice<'a> {
            orig: &'a [$orig],
        }

        $(#[$meta])*
        pub struct $slice_mut<'a> {
            orig: &'a mut Vec<$orig>,
        }

        impl<'a> $slice<'a> {
            pub(crate) fn new(orig: &'a [$orig]) -> Self {
                Self { orig }
            }

            pub fn len(&self) -> usize {
                self.orig.len()
            }

            pub fn is_empty(&self) -> bool {
                self.orig.is_empty()
            }

            /// Element at index `i`.
            ///
            /// # Panics
            ///
            /// Panics if `i >= self.len()`.
            pub fn at(&self, i: usize) -> $elem<'a> {
                let len = self.orig.len();
                match self.orig.get(i) {
                    Some(orig) => $elem::new(orig),
                    None => panic!(
                        "{}::at: index {} out of range for length {}",
                        stringify!($slice),
                        i,
                        len
                    ),
                }
            }

            pub fn iter(self) -> impl Iterator<Item = $elem<'a>> + 'a {
                self.orig.iter().map($elem::new)
            }

            /// Deep-copies every element into `dest`, replacing its contents.
            pub fn copy_to(&self, dest: &mut $slice_mut<'_>) {
                dest.orig.clear();
                dest.orig.resize_with(self.orig.len(), Default::default);
                for (src, dst) in self.orig.iter().zip(dest.orig.iter_mut()) {
                    $elem::new(src).copy_to(&mut $elem_mut::new(dst));
                }
            }
        }

        impl<'a> $slice_mut<'a> {
            pub(crate) fn new(orig: &'a mut Vec<$orig>) -> Self {
                Self { orig }
            }

            /// Shared view over the same sequence.
            pub fn as_view(&self) -> $slice<'_> {
                $slice::new(self.orig)
            }

            pub fn len(&self) -> usize {
                self.orig.len()
            }

            pub fn is_empty(&self) -> bool {
                self.orig.is_empty()
            }

            /// Shared element at index `i`.
            ///
            /// # Panics
            ///
            /// Panics if `i >= self.len()`.
            pub fn at(&self, i: usize) -> $elem<'_> {
                self.as_view().at(i)
            }

            /// Exclusive element at index `i`.
            ///
            /// # Panics
            ///
            /// Panics if `i >= self.len()`.
            pub fn at_mut(&mut self, i: usize) -> $elem_mut<'_> {
                let len = self.orig.len();
                match self.orig.get_mut(i) {
                    Some(orig) => $elem_mut::new(orig),
                    None => panic!(
                        "{}::at_mut: index {} out of range for length {}",
                        stringify!($slice_mut),
                        i,
                        len
                    ),
                }
            }

            pub fn iter(&self) -> impl Iterator<Item = $elem<'_>> + '_ {
                self.orig.iter().map($elem::new)
            }

            pub fn iter_mut(&mut self) -> impl Iterator<Item = $elem_mut<'_>> + '_ {
                self.orig.iter_mut().map($elem_mut::new)
            }

            /// Appends an empty element and returns a view over it.
            pub fn append_empty(&mut self) -> $elem_mut<'_> {
                self.orig.push(Default::default());
                let last = self.orig.len() - 1;
                $elem_mut::new(&mut self.orig[last])
            }

            /// Grows with empty elements or truncates to `new_len`.
            pub fn resize(&mut self, new_len: usize) {
                self.orig.resize_with(new_len, Default::default);
            }

            /// Removes every element for which `f` returns true, keeping order.
            pub fn remove_if<F>(&mut self, mut f: F)
            where
                F: FnMut($elem<'_>) -> bool,
            {
                self.orig.retain(|orig| !f($elem::new(orig)));
            }
        }

        impl PartialEq for $slice<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.orig == other.orig
            }
        }

        impl std::fmt::Debug for $slice<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_list().entries(self.orig.iter()).finish()
            }
        }
    };
}

/// `copy_to` for records without nested variant data: a plain deep clone.
macro_rules! pdata_leaf_copy {
    ($($view:ident => $view_mut:ident),* $(,)?) => {
        $(
            impl $view<'_> {
                /// Replaces `dest` with a deep copy of this record.
                pub fn copy_to(&self, dest: &mut $view_mut<'_>) {
                    dest.orig.clone_from(self.orig);
                }
            }
        )*
    };
}

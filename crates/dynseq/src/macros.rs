#[macro_export]
macro_rules! const_assert {
    ($check:expr $(,$msg:tt)*) => {
        const _: () = assert!($check $(,$msg)*);
    };
}

#[macro_export]
macro_rules! size_of {
    ($t:ty) => {
        size_of::<$t>()
    };
}

/// Implements a list of traits for one generic type.
///
/// Each entry is `Trait<Args> => items`, entries are separated by commas.
#[macro_export]
macro_rules! impl_traits {
    (
        for $type:ident $(<$($gen:tt $(: $bounds:tt)?),*>)?
        $trait_this:ident $(<$($trg_this:ty),+>)? =>
            $(type $stype_this:ident = $sty_this:ty;)*
            $(
                $(#[$macro_this:ident $(($macro_spec_this:ident))?])*
                fn $met_this:ident($($arg_this:tt)*) $(-> $ret_this:ty)? $body_this:block
            )*
        ,
        $($trait:ident $(<$($trg:ty),+>)? =>
            $(type $stype:ident = $sty:ty;)*
            $(
                $(#[$macro:ident $(($macro_spec:ident))?])*
                fn $met:ident($($arg:tt)*) $(-> $ret:ty)? $body:block
            )*
        ),*
        $(,)?
    ) =>
    {
        impl<$($($gen $(: $bounds)?),*)?> $trait_this $(<$($trg_this),+>)? for $type<$($($gen),*)?> {

            $(
                type $stype_this = $sty_this;
            )*

            $(
                $(#[$macro_this $(($macro_spec_this))?])*
                fn $met_this($($arg_this)*) $(-> $ret_this)? $body_this
            )*
        }
        $crate::impl_traits! {
            for $type $(<$($gen $(: $bounds)?),*>)?
            $($trait $(<$($trg),+>)? =>
                $(type $stype = $sty;)*
                $(
                    $(#[$macro $(($macro_spec))?])*
                    fn $met($($arg)*) $(-> $ret)? $body
                )*
            ),*
            ,
        }
    };
    (
        for $type:ident $(<$($gen:tt $(: $bounds:tt)?),*>)?
        ,
    ) =>
    {
    };
}

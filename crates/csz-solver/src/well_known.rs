//! Well-known library types.
//!
//! The enumeration and disposal protocols are defined against a small, fixed
//! library surface. `install_core_library` registers it into every new
//! catalog and records the ids here so resolvers never look them up by name.

use crate::catalog::CatalogBuilder;
use crate::def::DefId;
use crate::members::MemberId;
use crate::types::TypeId;

#[derive(Clone, Debug)]
pub struct WellKnownTypes {
    pub object: DefId,
    pub string: DefId,
    pub string_get_enumerator: MemberId,

    pub char_enumerator: DefId,
    pub char_enumerator_current: MemberId,
    pub char_enumerator_move_next: MemberId,

    pub idisposable: DefId,
    pub idisposable_dispose: MemberId,
    pub iasync_disposable: DefId,
    pub iasync_disposable_dispose_async: MemberId,

    /// `System.Collections.IEnumerable`
    pub ienumerable: DefId,
    pub ienumerable_get_enumerator: MemberId,
    /// `System.Collections.IEnumerator`
    pub ienumerator: DefId,
    pub ienumerator_current: MemberId,
    pub ienumerator_move_next: MemberId,

    /// `System.Collections.Generic.IEnumerable<T>`
    pub ienumerable_t: DefId,
    pub ienumerable_t_get_enumerator: MemberId,
    pub ienumerator_t: DefId,
    pub ienumerator_t_current: MemberId,

    pub iasync_enumerable_t: DefId,
    pub iasync_enumerable_t_get_async_enumerator: MemberId,
    pub iasync_enumerator_t: DefId,
    pub iasync_enumerator_t_current: MemberId,
    pub iasync_enumerator_t_move_next_async: MemberId,

    pub cancellation_token: DefId,
    pub task_t: DefId,
    pub value_task: DefId,
    pub value_task_t: DefId,
}

impl WellKnownTypes {
    /// Stand-in used only while the core library is being installed.
    pub(crate) const fn placeholder() -> Self {
        const NO_DEF: DefId = DefId::INVALID;
        const NO_MEMBER: MemberId = MemberId(u32::MAX);
        Self {
            object: NO_DEF,
            string: NO_DEF,
            string_get_enumerator: NO_MEMBER,
            char_enumerator: NO_DEF,
            char_enumerator_current: NO_MEMBER,
            char_enumerator_move_next: NO_MEMBER,
            idisposable: NO_DEF,
            idisposable_dispose: NO_MEMBER,
            iasync_disposable: NO_DEF,
            iasync_disposable_dispose_async: NO_MEMBER,
            ienumerable: NO_DEF,
            ienumerable_get_enumerator: NO_MEMBER,
            ienumerator: NO_DEF,
            ienumerator_current: NO_MEMBER,
            ienumerator_move_next: NO_MEMBER,
            ienumerable_t: NO_DEF,
            ienumerable_t_get_enumerator: NO_MEMBER,
            ienumerator_t: NO_DEF,
            ienumerator_t_current: NO_MEMBER,
            iasync_enumerable_t: NO_DEF,
            iasync_enumerable_t_get_async_enumerator: NO_MEMBER,
            iasync_enumerator_t: NO_DEF,
            iasync_enumerator_t_current: NO_MEMBER,
            iasync_enumerator_t_move_next_async: NO_MEMBER,
            cancellation_token: NO_DEF,
            task_t: NO_DEF,
            value_task: NO_DEF,
            value_task_t: NO_DEF,
        }
    }
}

/// Register the core library into `b`.
pub(crate) fn install_core_library(b: &mut CatalogBuilder) -> WellKnownTypes {
    const SYSTEM: &str = "System";
    const COLLECTIONS: &str = "System.Collections";
    const GENERIC: &str = "System.Collections.Generic";
    const TASKS: &str = "System.Threading.Tasks";

    let object = b.class("Object").namespace(SYSTEM).finish();
    let string = b.class("String").namespace(SYSTEM).sealed().finish();

    // System.Threading / System.Threading.Tasks
    let cancellation_token = b
        .structure("CancellationToken")
        .namespace("System.Threading")
        .finish();
    let value_task = b.structure("ValueTask").namespace(TASKS).finish();
    let value_task_t = b
        .structure("ValueTask")
        .namespace(TASKS)
        .type_params(&["TResult"])
        .finish();
    let task_t = b
        .class("Task")
        .namespace(TASKS)
        .type_params(&["TResult"])
        .finish();

    // Disposal
    let idisposable = b.interface("IDisposable").namespace(SYSTEM).finish();
    let idisposable_dispose = b.method(idisposable, "Dispose").finish();
    let iasync_disposable = b.interface("IAsyncDisposable").namespace(SYSTEM).finish();
    let value_task_type = b.named(value_task);
    let iasync_disposable_dispose_async = b
        .method(iasync_disposable, "DisposeAsync")
        .returns(value_task_type)
        .finish();
    let idisposable_type = b.named(idisposable);
    let iasync_disposable_type = b.named(iasync_disposable);

    // Non-generic enumeration
    let ienumerator = b.interface("IEnumerator").namespace(COLLECTIONS).finish();
    let ienumerator_current = b.property(ienumerator, "Current", TypeId::OBJECT).finish();
    let ienumerator_move_next = b
        .method(ienumerator, "MoveNext")
        .returns(TypeId::BOOL)
        .finish();
    b.method(ienumerator, "Reset").finish();
    let ienumerator_type = b.named(ienumerator);

    let ienumerable = b.interface("IEnumerable").namespace(COLLECTIONS).finish();
    let ienumerable_get_enumerator = b
        .method(ienumerable, "GetEnumerator")
        .returns(ienumerator_type)
        .finish();
    let ienumerable_type = b.named(ienumerable);

    // Generic enumeration
    let ienumerator_t = b
        .interface("IEnumerator")
        .namespace(GENERIC)
        .type_params(&["T"])
        .implements(ienumerator_type)
        .implements(idisposable_type)
        .finish();
    let t = b.type_param(ienumerator_t, 0);
    let ienumerator_t_current = b.property(ienumerator_t, "Current", t).finish();

    let ienumerable_t = b
        .interface("IEnumerable")
        .namespace(GENERIC)
        .type_params(&["T"])
        .implements(ienumerable_type)
        .finish();
    let t = b.type_param(ienumerable_t, 0);
    let enumerator_of_t = b.generic(ienumerator_t, &[t]);
    let ienumerable_t_get_enumerator = b
        .method(ienumerable_t, "GetEnumerator")
        .returns(enumerator_of_t)
        .finish();

    // Async enumeration
    let iasync_enumerator_t = b
        .interface("IAsyncEnumerator")
        .namespace(GENERIC)
        .type_params(&["T"])
        .implements(iasync_disposable_type)
        .finish();
    let t = b.type_param(iasync_enumerator_t, 0);
    let iasync_enumerator_t_current = b.property(iasync_enumerator_t, "Current", t).finish();
    let value_task_of_bool = b.generic(value_task_t, &[TypeId::BOOL]);
    let iasync_enumerator_t_move_next_async = b
        .method(iasync_enumerator_t, "MoveNextAsync")
        .returns(value_task_of_bool)
        .finish();

    let iasync_enumerable_t = b
        .interface("IAsyncEnumerable")
        .namespace(GENERIC)
        .type_params(&["T"])
        .finish();
    let t = b.type_param(iasync_enumerable_t, 0);
    let async_enumerator_of_t = b.generic(iasync_enumerator_t, &[t]);
    let token = b.named(cancellation_token);
    let iasync_enumerable_t_get_async_enumerator = b
        .method(iasync_enumerable_t, "GetAsyncEnumerator")
        .optional_param("cancellationToken", token)
        .returns(async_enumerator_of_t)
        .finish();

    // String enumeration
    let enumerator_of_char = b.generic(ienumerator_t, &[TypeId::CHAR]);
    let char_enumerator = b
        .class("CharEnumerator")
        .namespace(SYSTEM)
        .sealed()
        .implements(enumerator_of_char)
        .implements(idisposable_type)
        .finish();
    let char_enumerator_current = b.property(char_enumerator, "Current", TypeId::CHAR).finish();
    let char_enumerator_move_next = b
        .method(char_enumerator, "MoveNext")
        .returns(TypeId::BOOL)
        .finish();
    b.method(char_enumerator, "Dispose").finish();

    let enumerable_of_char = b.generic(ienumerable_t, &[TypeId::CHAR]);
    b.add_interface(string, enumerable_of_char);
    let char_enumerator_type = b.named(char_enumerator);
    let string_get_enumerator = b
        .method(string, "GetEnumerator")
        .returns(char_enumerator_type)
        .finish();

    WellKnownTypes {
        object,
        string,
        string_get_enumerator,
        char_enumerator,
        char_enumerator_current,
        char_enumerator_move_next,
        idisposable,
        idisposable_dispose,
        iasync_disposable,
        iasync_disposable_dispose_async,
        ienumerable,
        ienumerable_get_enumerator,
        ienumerator,
        ienumerator_current,
        ienumerator_move_next,
        ienumerable_t,
        ienumerable_t_get_enumerator,
        ienumerator_t,
        ienumerator_t_current,
        iasync_enumerable_t,
        iasync_enumerable_t_get_async_enumerator,
        iasync_enumerator_t,
        iasync_enumerator_t_current,
        iasync_enumerator_t_move_next_async,
        cancellation_token,
        task_t,
        value_task,
        value_task_t,
    }
}
